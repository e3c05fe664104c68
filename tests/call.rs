#[macro_use]
mod common;

#[cfg(test)]
mod call {
    tests! {
        nested in call is OK
        "40"
    }

    tests! {
        nil_not_callable in call is ERR
        "[line 1] runtime error: can only call functions and classes"
    }
}
