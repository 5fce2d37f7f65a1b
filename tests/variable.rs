#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        undefined in variable is ERR(70)
        "[line 1] Error at 'x': Undefined variable 'x'."
    }

    tests! {
        uninitialized in variable is OK
        "nil"
    }

    tests! {
        redeclare_global in variable is OK
        "2"
    }

    tests! {
        duplicate_local in variable is ERR(65)
        "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        use_in_own_initializer in variable is ERR(65)
        "[line 3] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        scope_reuse in variable is OK
        "first"
        "second"
    }
}
