#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_arguments in constructor is OK
        "7"
    }

    tests! {
        bare_return in constructor is OK
        "made"
    }

    tests! {
        return_value_from_init in constructor is ERR
        "[line 3] error at 'return': cannot return a value from an initializer"
    }

    tests! {
        reinvoke_init in constructor is OK
        "0"
    }
}
