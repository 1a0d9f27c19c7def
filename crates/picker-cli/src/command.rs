use picker_core::catalog::ProductId;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/categories",
    "/category",
    "/toggle",
    "/remove",
    "/details",
    "/selected",
    "/clear",
    "/routine",
    "/help",
];

/// One parsed line of REPL input. Anything that is not a slash command is a
/// chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Categories,
    /// `None` returns the product list to its placeholder.
    Category(Option<String>),
    Toggle(ProductId),
    Remove(ProductId),
    Details(ProductId),
    Selected,
    Clear,
    Routine,
    Help,
    Quit,
    Chat(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return Ok(Command::Quit);
        }
        if !line.starts_with('/') {
            return Ok(Command::Chat(line.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "/categories" => Ok(Command::Categories),
            "/category" => Ok(Command::Category(
                (!arg.is_empty()).then(|| arg.to_string()),
            )),
            "/toggle" => parse_id(name, arg).map(Command::Toggle),
            "/remove" => parse_id(name, arg).map(Command::Remove),
            "/details" => parse_id(name, arg).map(Command::Details),
            "/selected" => Ok(Command::Selected),
            "/clear" => Ok(Command::Clear),
            "/routine" => Ok(Command::Routine),
            "/help" => Ok(Command::Help),
            other => Err(format!("Unknown command: {other}")),
        }
    }
}

fn parse_id(name: &str, arg: &str) -> Result<ProductId, String> {
    arg.parse()
        .map_err(|_| format!("Usage: {name} <product id>"))
}
