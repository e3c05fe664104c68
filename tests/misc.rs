#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        empty_file in misc is OK
    }

    tests! {
        unexpected_character in misc is ERR
        "[line 2] error: unexpected character '|'"
    }

    tests! {
        question_colon in misc is ERR
        "[line 1] error at '?': expected ';' after expression"
    }

    #[test]
    fn usage_with_too_many_arguments() {
        use assert_cmd::Command;

        Command::cargo_bin("shale").unwrap()
            .args(["one.shale", "two.shale"])
            .assert()
            .stderr("usage:shale [script]\n")
            .failure();
    }
}
