/// Format a message template with named variables.
///
/// ```
/// use uber_messages::msg;
/// let text = msg!("Removed site '{name}'", name = "blog");
/// assert_eq!(text, "Removed site 'blog'");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        {
            let mut builder = $crate::builder::MessageBuilder::new($template);
            $(
                builder = builder.var(stringify!($key), $value);
            )+
            builder.build()
        }
    };
}
