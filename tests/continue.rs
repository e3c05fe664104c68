#[macro_use]
mod common;

#[cfg(test)]
mod _continue {
    tests! {
        inside_while in continue is OK
        "1"
        "3"
        "4"
        "5"
    }

    tests! {
        inside_for in continue is OK
        "0"
        "1"
        "3"
    }

    tests! {
        no_loop in continue is ERR
        "[line 1] error at 'continue': cannot continue outside of a loop"
    }
}
