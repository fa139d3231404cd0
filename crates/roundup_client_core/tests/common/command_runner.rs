//! Run text commands against the allocation API.
//! Commands: open <preset>, open_custom <mode> id=pct [id=pct ...], adjust <bucket> <delta>, save, drop
//! Empty lines and # comments are skipped.

use roundup_client_core::{
    adjust_allocation, create_allocation_set, create_preset_allocation_set, drop_allocation_set,
    save_allocations,
};

pub fn parse_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut buf = String::new();
    let mut in_quotes = false;
    for c in input.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ' ' && !in_quotes {
            if !buf.is_empty() {
                args.push(std::mem::take(&mut buf));
            }
        } else {
            buf.push(c);
        }
    }
    if !buf.is_empty() {
        args.push(buf);
    }
    args
}

/// Holds the open set and the result of the last command so assertions can inspect it.
#[derive(Default)]
pub struct CommandRunner {
    pub set_id: Option<String>,
    /// JSON returned by the last adjust/save.
    pub last_json: Option<serde_json::Value>,
    /// Error string returned by the last command, if it failed in an expected way.
    pub last_error: Option<String>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(&self) -> Result<String, String> {
        self.set_id.clone().ok_or_else(|| "no allocation set open (run \"open <preset>\" first)".to_string())
    }

    /// Execute a list of commands. Returns Err on first failure.
    pub fn execute_commands(&mut self, commands: &[&str]) -> Result<(), String> {
        for cmd in commands {
            let cmd = cmd.trim();
            if cmd.is_empty() || cmd.starts_with('#') {
                continue;
            }
            self.execute_command(cmd)?;
        }
        Ok(())
    }

    /// API errors from adjust/save are recorded in `last_error` instead of failing the run,
    /// so a script can assert on them.
    pub fn execute_command(&mut self, cmd: &str) -> Result<(), String> {
        let args = parse_args(cmd);
        let Some(verb) = args.first() else {
            return Ok(());
        };
        match verb.as_str() {
            "open" => {
                let preset = args.get(1).ok_or("open: missing preset")?;
                self.set_id = Some(create_preset_allocation_set(preset.clone())?);
                self.last_json = None;
                self.last_error = None;
            }
            "open_custom" => {
                let mode = args.get(1).ok_or("open_custom: missing mode")?;
                let mut buckets = Vec::new();
                for entry in &args[2..] {
                    let (id, pct) = entry
                        .split_once('=')
                        .ok_or_else(|| format!("open_custom: expected id=pct, got {}", entry))?;
                    let pct: i64 = pct.parse().map_err(|_| format!("open_custom: bad percentage {}", pct))?;
                    buckets.push(serde_json::json!({ "id": id, "percentage": pct }));
                }
                let config = serde_json::json!({ "mode": mode, "buckets": buckets });
                self.set_id = Some(create_allocation_set(config.to_string())?);
                self.last_json = None;
                self.last_error = None;
            }
            "adjust" => {
                let bucket = args.get(1).ok_or("adjust: missing bucket")?;
                let delta: f64 = args
                    .get(2)
                    .ok_or("adjust: missing delta")?
                    .parse()
                    .map_err(|_| format!("adjust: bad delta in {:?}", cmd))?;
                let result = adjust_allocation(self.set_id()?, bucket.clone(), delta);
                self.record(result)?;
            }
            "save" => {
                let result = save_allocations(self.set_id()?);
                self.record(result)?;
            }
            "drop" => {
                if !drop_allocation_set(self.set_id()?) {
                    return Err("drop: set was not open".to_string());
                }
            }
            other => return Err(format!("unknown command: {}", other)),
        }
        Ok(())
    }

    fn record(&mut self, result: Result<String, String>) -> Result<(), String> {
        match result {
            Ok(json) => {
                self.last_json = Some(serde_json::from_str(&json).map_err(|e| e.to_string())?);
                self.last_error = None;
            }
            Err(e) => {
                self.last_json = None;
                self.last_error = Some(e);
            }
        }
        Ok(())
    }
}
