#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        in_method in this is OK
        "Echo instance"
    }

    tests! {
        in_function in this is ERR
        "[line 2] error at 'this': cannot use 'this' outside of a class"
    }
}
