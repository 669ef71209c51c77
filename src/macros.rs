// src/macros.rs
//
// String shorthands used across the crate: `s!` for owned strings
// (`s!()` empty, `s!(x)` from anything `String::from` accepts) and `join!`
// for concatenating path pieces and URL parts without `format!`.

#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut out = ::std::string::String::from($first);
        $(
            out.push_str($rest);
        )+
        out
    }};
}
