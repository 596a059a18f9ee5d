use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("homebound")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("homebound")
        .about(
            "Crawl a site breadth-first from a start page and report broken links, \
        outgoing links and pages that can't link back home.",
        )
        .styles(CLAP_STYLING)
        .arg(arg!(<URL> "The start page; http:// is assumed when no scheme is given"))
        .arg(
            arg!(--"linklimit" <NUM_LINKS>)
                .required(false)
                .help("Most outgoing links to consider before the crawl stops")
                .value_parser(clap::value_parser!(usize))
                .default_value("1000"),
        )
        .arg(
            arg!(--"searchprefix" <PREFIX>)
                .required(false)
                .help(
                    "Only crawl addresses containing this text (default: the start page's \
                domain)",
                ),
        )
        .arg(
            arg!(--"action" <ACTION>)
                .required(false)
                .help("What to report: summary, brokenlinks, outgoinglinks")
                .value_parser(["summary", "brokenlinks", "outgoinglinks"])
                .default_value("summary"),
        )
        .arg(
            arg!(-t --"threads" <NUM_WORKERS>)
                .required(false)
                .help("The number of pages fetched at once.")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            arg!(--"delay" <MILLISECONDS>)
                .required(false)
                .help("Pause between fetches in milliseconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("500"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
}
