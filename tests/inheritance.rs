#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "Base.foo()"
    }

    tests! {
        set_fields_from_base in inheritance is OK
        "base"
    }

    tests! {
        superclass_not_class in inheritance is ERR(70)
        "[line 2] Error at 'NotClass': Superclass must be a class."
    }
}
