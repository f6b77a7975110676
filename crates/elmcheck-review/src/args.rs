use elmcheck_core::ActionInputs;

/// Report flag forced on every run so stdout is machine-readable.
pub const REPORT_FLAG: &str = "--report=json";

/// Build the elm-review command line from the action inputs.
///
/// Order: file globs (one token per line), `--report=json`, then `--config`,
/// `--compiler`, `--elm-format-path`, `--elmjson` for non-empty inputs, and
/// finally the ignored directories joined with spaces into a single
/// `--ignore-dirs "<dirs>"` token.
///
/// # Examples
///
/// ```
/// use elmcheck_core::ActionInputs;
/// use elmcheck_review::args::build_args;
///
/// let inputs = ActionInputs {
///     elm_files: "src/\ntests/".into(),
///     elm_json: "elm.json".into(),
///     ..ActionInputs::default()
/// };
/// assert_eq!(
///     build_args(&inputs),
///     vec!["src/", "tests/", "--report=json", "--elmjson", "elm.json"],
/// );
/// ```
pub fn build_args(inputs: &ActionInputs) -> Vec<String> {
    let mut args: Vec<String> = lines(&inputs.elm_files).map(str::to_string).collect();
    args.push(REPORT_FLAG.to_string());

    let optional = [
        ("--config", &inputs.elm_review_config),
        ("--compiler", &inputs.elm_compiler),
        ("--elm-format-path", &inputs.elm_format),
        ("--elmjson", &inputs.elm_json),
    ];
    for (flag, value) in optional {
        let value = value.trim();
        if !value.is_empty() {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    let ignored: Vec<&str> = lines(&inputs.ignore_dirs).collect();
    if !ignored.is_empty() {
        args.push(format!("--ignore-dirs \"{}\"", ignored.join(" ")));
    }

    args
}

fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty())
}
