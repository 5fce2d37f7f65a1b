#[macro_use]
mod common;

#[cfg(test)]
mod return_stmt {
    tests! {
        after_else in return_stmt is OK
        "yes"
    }

    tests! {
        no_value in return_stmt is OK
        "nil"
    }

    tests! {
        at_top_level in return_stmt is ERR(65)
        "[line 1] Error at 'return': Can't return from top-level code."
    }
}
