use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendlens_core::UnparseableAmountPolicy;
use spendlens_ingest::{LoadOptions, Sources};
use std::fs;
use std::path::{Path, PathBuf};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesSection,
    pub ingest: IngestSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesSection {
    /// Text file, one exempt description fragment per line.
    pub exemptions: Option<PathBuf>,
    /// Category mapping CSV.
    pub mapping: Option<PathBuf>,
    /// Bank exports, loaded in this order.
    pub expenses: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// Skip rows whose Debit cell is empty (payments, refunds, income).
    pub debits_only: bool,
    pub unparseable_amount: UnparseableAmountPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            exemptions: Some(PathBuf::from("configurations/expense-exemptions.txt")),
            mapping: Some(PathBuf::from("configurations/mapping.csv")),
            expenses: vec![
                PathBuf::from("data/america-first-ytd.csv"),
                PathBuf::from("data/citi-ytd.csv"),
            ],
        }
    }
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            debits_only: true,
            unparseable_amount: UnparseableAmountPolicy::Zero,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Make relative source paths relative to `base` (the config file's directory).
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let paths = self
            .sources
            .exemptions
            .iter_mut()
            .chain(self.sources.mapping.iter_mut())
            .chain(self.sources.expenses.iter_mut());
        for p in paths {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    pub fn sources(&self) -> Sources {
        Sources {
            exemptions: self.sources.exemptions.clone(),
            mapping: self.sources.mapping.clone(),
            expenses: self.sources.expenses.clone(),
        }
    }

    pub fn load_options(&self, strict: bool) -> LoadOptions {
        LoadOptions {
            debits_only: self.ingest.debits_only,
            amount_policy: self.ingest.unparseable_amount,
            strict,
        }
    }
}

/// `~/.spendlens/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".spendlens").join("config.toml"))
}

/// Read `path`, or defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: Config =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    if let Some(dir) = path.parent() {
        cfg.resolve_relative_to(dir);
    }
    Ok(cfg)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(&Config::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
