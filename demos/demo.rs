use optbind::{flag, opt, parse_env_arguments, usage_string};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("optbind=warn")),
        )
        .init();

    let mut display_usage = false;
    let mut flag_on = false;
    let mut number = 0i32;
    let mut optional_string = "default".to_string();
    let mut positionals = Vec::new();

    let mut opts = [
        flag(&mut display_usage, "Display usage string and exit")
            .long("usage")
            .short('u'),
        flag(&mut flag_on, "Set flag to true").long("flag").short('f'),
        opt(&mut number, "A required integer parameter")
            .long("number")
            .short('n')
            .required(),
        opt(&mut optional_string, "An optional string")
            .long("optional-string")
            .short('s'),
    ];

    let result = parse_env_arguments(&mut opts, Some(&mut positionals));
    let usage = usage_string("ExampleProgram", &opts, true);

    if let Err(e) = result {
        e.exit(&usage);
    }

    if display_usage {
        print!("{}", usage);
        return;
    }

    println!("Flag:     {}", flag_on);
    println!("Number:   {}", number);
    println!("String:   {}", optional_string);
    println!("Files:    {:?}", positionals);
}
