#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        fib in function is OK
        "55"
    }

    tests! {
        parameters in function is OK
        "6"
    }

    tests! {
        print_function in function is OK
        "<fn foo>"
    }

    tests! {
        print_native in function is OK
        "<native fn clock>"
    }

    tests! {
        mutual_recursion in function is OK
        "true"
        "true"
    }

    tests! {
        nil_return in function is OK
        "nil"
    }

    tests! {
        clock in function is OK
        "true"
        "true"
    }

    tests! {
        too_many_params in function is ERR(65)
        "[line 1] Error at 'a256': Can't have more than 255 parameters."
    }
}
