// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Backend id")
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Terminal client for a personal-finance backend")
        .version(clap::crate_version!())
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to config.toml"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging to stderr"),
        )
        .subcommand(
            Command::new("session")
                .about("Choose the user commands act for")
                .subcommand(
                    Command::new("use")
                        .arg(
                            Arg::new("user-id")
                                .long("user-id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(Command::new("show"))
                .subcommand(Command::new("clear"))
                .subcommand(
                    Command::new("currency")
                        .about("Set the display currency")
                        .arg(Arg::new("code").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Budgets and their category allocations")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("monthly")
                                .value_parser(["monthly", "annually"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end").required(true))
                        .arg(
                            Arg::new("allocate")
                                .long("allocate")
                                .action(ArgAction::Append)
                                .help("CATEGORY=AMOUNT, repeatable"),
                        ),
                )
                .subcommand(Command::new("delete").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("chart").arg(id_arg()).arg(
                        Arg::new("period")
                            .long("period")
                            .default_value("daily")
                            .value_parser(["daily", "monthly"]),
                    ),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("tags").long("tags").help("Comma-separated")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Income/expense categories")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("style")
                        .about("Show the icon and color a category name resolves to")
                        .arg(Arg::new("name").required(false)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(
                    Command::new("create")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(
                    Command::new("contribute")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("savings").arg(id_arg())))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("rm-saving").arg(id_arg())),
        )
        .subcommand(
            Command::new("notify")
                .about("Notifications")
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include already-read notifications"),
                    ),
                ))
                .subcommand(Command::new("read").arg(id_arg()))
                .subcommand(Command::new("read-all"))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("watch")
                        .about("Poll for unread notifications")
                        .arg(
                            Arg::new("interval")
                                .long("interval")
                                .value_parser(value_parser!(u64))
                                .help("Seconds between polls (default from config)"),
                        )
                        .arg(
                            Arg::new("count")
                                .long("count")
                                .value_parser(value_parser!(u64))
                                .help("Stop after this many polls"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Generated reports")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("open").arg(id_arg()))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(
                    Command::new("upload")
                        .arg(Arg::new("file").long("file").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("monthly-summary"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(["income", "expense"]),
                    )
                    .arg(Arg::new("category").long("category"))
                    .arg(Arg::new("from").long("from"))
                    .arg(Arg::new("to").long("to")),
            ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Budgets, goals and unread notifications at a glance"),
        ))
        .subcommand(Command::new("doctor").about("Check session, backend and storage setup"))
        .subcommand(
            Command::new("config")
                .subcommand(Command::new("path"))
                .subcommand(Command::new("show")),
        )
}
