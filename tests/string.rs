#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        concat in string is OK
        "foobar"
    }

    tests! {
        multiline in string is OK
        "line1"
        "line2"
        "after"
    }

    tests! {
        unterminated in string is ERR
        "[line 1] error: unterminated string"
    }
}
