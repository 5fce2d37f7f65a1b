#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        precedence in misc is OK
        "14"
        "20"
        "10"
        "5"
        "false"
        "true"
    }

    tests! {
        unexpected_characters in misc is ERR(65)
        "[line 1] Error: Unexpected character '#'."
        "[line 2] Error: Unexpected character '^'."
    }

    tests! {
        multiple_parse_errors in misc is ERR(65)
        "[line 2] Error at 'print': Expect ';' after value."
        "[line 3] Error at '=': Expect variable name."
    }

    tests! {
        missing_semicolon in misc is ERR(65)
        "[line 1] Error at end: Expect ';' after value."
    }
}
