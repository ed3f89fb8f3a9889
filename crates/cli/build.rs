use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("stacks")
        .version("1.0.0")
        .author("Stacks Contributors")
        .about("Browse a library catalog as typed records")
        .arg(clap::arg!(--base_url <URL> "Catalog base URL").value_name("URL"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--json "Emit JSON instead of text"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .subcommand(
            clap::Command::new("search")
                .about("Search the catalog for books or curated lists")
                .arg(clap::arg!(<QUERY> "Query string"))
                .arg(
                    clap::arg!(-k --kind <KIND> "Search kind")
                        .default_value("keyword")
                        .value_parser(["keyword", "title", "author", "subject", "tag", "list"]),
                )
                .arg(clap::arg!(-p --pages <NUM> "Number of result pages to fetch").default_value("1")),
        )
        .subcommand(
            clap::Command::new("item")
                .about("Show an item's detail page")
                .arg(clap::arg!(<ID> "Numeric catalog identifier")),
        )
        .subcommand(
            clap::Command::new("user")
                .about("Show a user's profile, followers, following and lists")
                .arg(clap::arg!(<NAME> "Profile name")),
        )
        .subcommand(
            clap::Command::new("branch")
                .about("Show a branch and its weekly hours")
                .arg(clap::arg!(<NAME> "Branch name")),
        )
        .subcommand(clap::Command::new("holds").about("List the signed-in account's holds"))
        .subcommand(clap::Command::new("checkouts").about("List the signed-in account's checkouts"))
        .subcommand(
            clap::Command::new("shelf")
                .about("List one of the signed-in account's shelves")
                .arg(
                    clap::arg!(--shelf <SHELF> "Shelf to list")
                        .default_value("for-later")
                        .value_parser(["for-later", "in-progress", "completed"]),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "stacks", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "stacks", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "stacks", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "stacks", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
