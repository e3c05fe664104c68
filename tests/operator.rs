#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        precedence in operator is OK
        "14"
        "20"
        "3"
        "10"
        "-1"
        "true"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
        "true"
        "false"
    }

    tests! {
        equality_types in operator is OK
        "true"
        "false"
        "true"
        "false"
        "false"
        "true"
    }

    tests! {
        add_mixed in operator is ERR
        "[line 1] runtime error: operands must be two numbers or two strings"
    }

    tests! {
        compare_mixed in operator is ERR
        "[line 1] runtime error: operands must be numbers"
    }

    tests! {
        divide_by_zero in operator is ERR
        "[line 1] runtime error: division by zero"
    }

    tests! {
        negate_string in operator is ERR
        "[line 1] runtime error: operand must be a number"
    }
}
