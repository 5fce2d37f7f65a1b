#[macro_use]
mod common;

#[cfg(test)]
mod this_keyword {
    tests! {
        in_method in this_keyword is OK
        "baz"
    }

    tests! {
        at_top_level in this_keyword is ERR(65)
        "[line 1] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        in_function in this_keyword is ERR(65)
        "[line 2] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        in_callback in this_keyword is OK
        "callback"
    }
}
