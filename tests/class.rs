#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        empty in class is OK
        "Foo"
    }

    tests! {
        identity in class is OK
        "true"
        "false"
        "true"
    }

    tests! {
        inherit_self in class is ERR(65)
        "[line 1] Error at 'Foo': A class can't inherit from itself."
    }

    tests! {
        local_reference_self in class is OK
        "Foo"
    }
}
