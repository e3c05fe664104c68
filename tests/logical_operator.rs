#[macro_use]
mod common;

#[cfg(test)]
mod logical_operator {
    tests! {
        short_circuit in logical_operator is OK
        "true"
        "false"
    }

    tests! {
        returns_value in logical_operator is OK
        "yes"
        "nil"
        "1"
        "2"
        "0"
    }
}
