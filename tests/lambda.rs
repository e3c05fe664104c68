#[macro_use]
mod common;

#[cfg(test)]
mod lambda {
    tests! {
        immediate_call in lambda is OK
        "5"
    }

    tests! {
        display in lambda is OK
        "<lambda (a,b)>"
        "<lambda ()>"
    }

    tests! {
        as_argument in lambda is OK
        "42"
    }

    tests! {
        curried in lambda is OK
        "3"
    }
}
