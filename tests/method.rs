#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        bound_method in method is OK
        "hello sam"
    }

    tests! {
        state in method is OK
        "3"
    }

    tests! {
        closure_in_method in method is OK
        "hi closure"
    }
}
