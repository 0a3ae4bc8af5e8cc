/// Builds a [`Record`](crate::Record) from `key => value` pairs.
///
/// ```
/// let user = vellum::record! { "name" => "a", "age" => 30 };
/// assert_eq!(user.get_str("name"), Some("a"));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($key, $value);
        )+
        record
    }};
}
