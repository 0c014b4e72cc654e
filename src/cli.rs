// src/cli.rs
use std::{env, fs, path::PathBuf, sync::Arc};

use color_eyre::eyre::{Result, bail};

use crate::config::options::{RunOptions, StateSelector};
use crate::config::publish::PublishConfig;
use crate::encode;
use crate::harvest::aggregate;
use crate::net::HttpClient;
use crate::progress::Progress;
use crate::publish;
use crate::publish::store::HttpObjectStore;
use crate::publish::trigger::CdmTrigger;
use crate::registry::{self, State};
use crate::report::RunReport;
use crate::specs::DatasetKind;

struct CliProgress {
    done: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_done(&mut self, state: &str, records: usize) {
        self.done += 1;
        logf!("[{}/{}] {state}: {records} rows", self.done, self.total);
    }
    fn item_failed(&mut self, state: &str) {
        self.done += 1;
        logw!("[{}/{}] {state}: all sources failed", self.done, self.total);
    }
}

pub fn run() -> Result<()> {
    let mut opts = RunOptions::new();
    parse_cli(&mut opts)?;

    if opts.list_states {
        for st in registry::all() {
            println!("{},{}", st.code, st.name);
        }
        return Ok(());
    }

    let states = resolve_states(&opts.states)?;
    let spec = opts.dataset.spec();
    logf!("harvesting {} for {} state(s)", spec.name, states.len());

    let transport = Arc::new(HttpClient::new()?);
    let mut progress = CliProgress { done: 0, total: 0 };
    let dataset = aggregate::harvest_all(
        transport,
        spec,
        states,
        opts.workers,
        Some(&mut progress),
    );

    let csv_text = encode::encode(&dataset, spec);
    let mut report = RunReport::new(&dataset, spec);

    if let Some(path) = &opts.out {
        fs::write(path, &csv_text)?;
        logf!("wrote {}", path.display());
    }

    let mut fatal: Option<String> = None;
    if opts.publish {
        if dataset.total_record_count == 0 {
            // An empty upload would still start the migration job; don't.
            fatal = Some(s!("no data harvested from any state; nothing published"));
        } else {
            let cfg = PublishConfig::from_env()?;
            let store = HttpObjectStore::new(&cfg)?;
            let trigger = CdmTrigger::new(&cfg)?;
            let outcome = publish::publish(
                &csv_text,
                &store,
                &trigger,
                &cfg,
                spec,
                dataset.generated_at,
            );
            if let Err(e) = &outcome.upload {
                fatal = Some(format!("upload failed; migration job not started: {e}"));
            }
            report = report.with_publish(&outcome);
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(msg) = fatal {
        bail!(msg);
    }
    Ok(())
}

fn resolve_states(selector: &StateSelector) -> Result<Vec<&'static State>> {
    match selector {
        StateSelector::All => Ok(registry::all().iter().collect()),
        StateSelector::Named(names) => {
            let mut states = Vec::with_capacity(names.len());
            for name in names {
                match registry::resolve(name) {
                    Some(st) => {
                        if !states.iter().any(|s: &&State| s.code == st.code) {
                            states.push(st);
                        }
                    }
                    None => bail!("unknown state: {name}"),
                }
            }
            if states.is_empty() {
                bail!("no states selected");
            }
            Ok(states)
        }
    }
}

fn parse_cli(opts: &mut RunOptions) -> Result<()> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-d" | "--dataset" => {
                let v = args
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("Missing value for --dataset"))?;
                opts.dataset = match DatasetKind::parse(&v) {
                    Some(k) => k,
                    None => bail!("Unknown dataset: {v}"),
                };
            }
            "-s" | "--states" => {
                let v = args
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("Missing value for --states"))?;
                let names: Vec<String> = v
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(|p| s!(p))
                    .collect();
                opts.states = StateSelector::Named(names);
            }
            "-a" | "--all" => opts.states = StateSelector::All,
            "--list-states" => opts.list_states = true,
            "-o" | "--out" => {
                let v = args
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("Missing output path"))?;
                opts.out = Some(PathBuf::from(v));
            }
            "--no-publish" => opts.publish = false,
            "--workers" => {
                let v: usize = args
                    .next()
                    .ok_or_else(|| color_eyre::eyre::eyre!("Missing value for --workers"))?
                    .parse()?;
                if v == 0 || v > 16 {
                    bail!("--workers out of range (1..=16)");
                }
                opts.workers = v;
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }

    Ok(())
}
