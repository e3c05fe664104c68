#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        get_set in field is OK
        "42"
    }

    tests! {
        set_evaluates_to_value in field is OK
        "stored"
    }

    tests! {
        undefined_property in field is ERR
        "[line 2] runtime error: undefined property 'missing'"
    }

    tests! {
        get_on_non_instance in field is ERR
        "[line 2] runtime error: only instances have properties"
    }

    tests! {
        set_on_non_instance in field is ERR
        "[line 2] runtime error: only instances have fields"
    }

    tests! {
        fields_shadow_methods in field is OK
        "field"
    }
}
