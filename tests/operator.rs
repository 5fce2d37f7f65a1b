#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        arithmetic in operator is OK
        "3"
        "5.5"
        "12"
        "2.5"
        "true"
        "true"
        "false"
        "false"
        "3"
        "false"
        "true"
    }

    tests! {
        add_mixed_types in operator is ERR(70)
        "[line 1] Error at '+': Operands must be two numbers or two strings."
    }

    tests! {
        error_line in operator is ERR(70)
        "[line 3] Error at '+': Operands must be two numbers or two strings."
    }

    tests! {
        comparison_strings in operator is ERR(70)
        "[line 1] Error at '<': Operands must be numbers."
    }

    tests! {
        subtract_strings in operator is ERR(70)
        "[line 1] Error at '-': Operands must be numbers."
    }

    tests! {
        negate_string in operator is ERR(70)
        "[line 1] Error at '-': Operand must be a number."
    }

    tests! {
        equality_across_types in operator is OK
        "false"
        "false"
        "true"
        "false"
    }
}
