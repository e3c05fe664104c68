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
        "<native fn clock>"
    }

    tests! {
        nil_return in function is OK
        "nil"
    }

    tests! {
        mutual_recursion in function is OK
        "true"
        "true"
    }

    tests! {
        clock in function is OK
        "true"
        "true"
    }

    tests! {
        extra_arguments in function is ERR
        "[line 4] runtime error: expected 2 arguments but got 4"
    }

    tests! {
        missing_arguments in function is ERR
        "[line 2] runtime error: expected 2 arguments but got 1"
    }

    tests! {
        not_callable in function is ERR
        "[line 1] runtime error: can only call functions and classes"
    }
}
