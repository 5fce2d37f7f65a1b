#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        early_return in constructor is OK
        "A instance"
    }

    tests! {
        arguments in constructor is OK
        "3"
    }

    tests! {
        default in constructor is OK
        "Foo instance"
    }

    tests! {
        return_value in constructor is ERR(65)
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }

    tests! {
        default_arguments in constructor is ERR(70)
        "[line 3] Error at ')': Expected 0 arguments but got 3."
    }

    tests! {
        direct_init in constructor is OK
        "Foo instance"
    }
}
