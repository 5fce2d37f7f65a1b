/// Runs the compiled binary against `tests/scripts/<scope>/<file>.lox`.
///
/// The OK arm asserts a clean exit with exactly the given stdout lines. The
/// ERR arm asserts the given exit code (65 for compile-time errors, 70 for
/// runtime errors) with exactly the given stderr lines.
#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            let mut expected: Vec<&str> = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match expected.len() {
                0 => String::new(),
                _ => {
                    // add empty string to end to add new line to end of output
                    expected.push("");
                    expected.join("\n")
                }
            };

            let file = format!("tests/scripts/{}/{}.lox", stringify!($scope), stringify!($file));

            Command::cargo_bin("lox").unwrap()
                .arg(file)
                .assert()
                .success()
                .stdout(expected);
        }
    };

    ($file:ident in $scope:ident is ERR($code:expr) $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            // output concats expected with new line
            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/scripts/{}/{}.lox", stringify!($scope), stringify!($file));

            Command::cargo_bin("lox").unwrap()
                .arg(file)
                .assert()
                .code($code)
                .stderr(format!("{output}\n"));
        }
    };
}
