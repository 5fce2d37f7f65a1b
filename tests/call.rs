#[macro_use]
mod common;

#[cfg(test)]
mod call {
    tests! {
        string_target in call is ERR(70)
        "[line 1] Error at ')': Can only call functions and classes."
    }

    tests! {
        nil_target in call is ERR(70)
        "[line 1] Error at ')': Can only call functions and classes."
    }

    tests! {
        number_target in call is ERR(70)
        "[line 1] Error at ')': Can only call functions and classes."
    }

    tests! {
        missing_arguments in call is ERR(70)
        "[line 3] Error at ')': Expected 2 arguments but got 1."
    }

    tests! {
        extra_arguments in call is ERR(70)
        "[line 5] Error at ')': Expected 2 arguments but got 4."
    }

    tests! {
        too_many_arguments in call is ERR(65)
        "[line 3] Error at '256': Can't have more than 255 arguments."
    }
}
