//! Run assertion "commands" against the open allocation set, in the same style as run_commands.
//! e.g. "total 100", "bucket sadaqah 45", "outcome rejected", "reason would_exceed_cap".
//! Empty lines and # comments are skipped.

use super::command_runner::{parse_args, CommandRunner};
use roundup_client_core::{can_save_allocations, get_allocations, get_group_total, get_percentage, get_total};

fn expect_number(args: &[String], idx: usize, cmd: &str) -> Result<i64, String> {
    args.get(idx)
        .ok_or_else(|| format!("{:?}: missing value", cmd))?
        .parse()
        .map_err(|_| format!("{:?}: expected a number", cmd))
}

fn compare(actual: i64, op: &str, expected: i64) -> bool {
    match op {
        ">=" => actual >= expected,
        ">" => actual > expected,
        "<=" => actual <= expected,
        _ => actual == expected,
    }
}

/// Run a list of assertion commands. Returns Err on first failure.
/// Commands:
///   total <n> | total >= <n> | total <= <n>
///   bucket <id> <n>              : percentage of one bucket
///   group <group> <n>            : subtotal of one group
///   buckets <n> <n> ...          : every percentage, in set order
///   can_save true|false
///   outcome applied|unchanged|rejected
///   reason <kind>                : rejection kind of the last adjust
///   current <n>                  : value after the last applied adjust
///   error "<substring>"          : last command failed with a message containing this
pub fn assert_commands(runner: &CommandRunner, commands: &[&str]) -> Result<(), String> {
    for cmd in commands {
        let cmd = cmd.trim();
        if cmd.is_empty() || cmd.starts_with('#') {
            continue;
        }
        assert_command(runner, cmd)?;
    }
    Ok(())
}

fn assert_command(runner: &CommandRunner, cmd: &str) -> Result<(), String> {
    let args = parse_args(cmd);
    let Some(what) = args.first() else {
        return Ok(());
    };
    match what.as_str() {
        "total" => {
            let (op, idx) = match args.get(1).map(String::as_str) {
                Some(op @ (">=" | ">" | "<=")) => (op, 2),
                _ => ("==", 1),
            };
            let expected = expect_number(&args, idx, cmd)?;
            let actual = i64::from(get_total(runner.set_id()?)?);
            if !compare(actual, op, expected) {
                return Err(format!("total: expected {} {}, got {}", op, expected, actual));
            }
        }
        "bucket" => {
            let id = args.get(1).ok_or("bucket: missing id")?;
            let expected = expect_number(&args, 2, cmd)?;
            let actual = i64::from(get_percentage(runner.set_id()?, id.clone())?);
            if actual != expected {
                return Err(format!("bucket {}: expected {}, got {}", id, expected, actual));
            }
        }
        "group" => {
            let group = args.get(1).ok_or("group: missing group")?;
            let expected = expect_number(&args, 2, cmd)?;
            let actual = i64::from(get_group_total(runner.set_id()?, group.clone())?);
            if actual != expected {
                return Err(format!("group {}: expected {}, got {}", group, expected, actual));
            }
        }
        "buckets" => {
            let snapshot: serde_json::Value =
                serde_json::from_str(&get_allocations(runner.set_id()?)?).map_err(|e| e.to_string())?;
            let actual: Vec<i64> = snapshot["buckets"]
                .as_array()
                .ok_or("buckets: snapshot has no bucket list")?
                .iter()
                .filter_map(|b| b["percentage"].as_i64())
                .collect();
            let expected = (1..args.len())
                .map(|i| expect_number(&args, i, cmd))
                .collect::<Result<Vec<_>, _>>()?;
            if actual != expected {
                return Err(format!("buckets: expected {:?}, got {:?}", expected, actual));
            }
        }
        "can_save" => {
            let expected = matches!(args.get(1).map(String::as_str), Some("true"));
            let actual = can_save_allocations(runner.set_id()?)?;
            if actual != expected {
                return Err(format!("can_save: expected {}, got {}", expected, actual));
            }
        }
        "outcome" => {
            let expected = args.get(1).ok_or("outcome: missing value")?;
            let last = runner.last_json.as_ref().ok_or("outcome: no adjust result recorded")?;
            if last["outcome"].as_str() != Some(expected.as_str()) {
                return Err(format!("outcome: expected {}, got {}", expected, last["outcome"]));
            }
        }
        "reason" => {
            let expected = args.get(1).ok_or("reason: missing kind")?;
            let last = runner.last_json.as_ref().ok_or("reason: no adjust result recorded")?;
            if last["reason"]["kind"].as_str() != Some(expected.as_str()) {
                return Err(format!("reason: expected {}, got {}", expected, last["reason"]));
            }
        }
        "current" => {
            let expected = expect_number(&args, 1, cmd)?;
            let last = runner.last_json.as_ref().ok_or("current: no adjust result recorded")?;
            if last["current"].as_i64() != Some(expected) {
                return Err(format!("current: expected {}, got {}", expected, last["current"]));
            }
        }
        "error" => {
            let needle = args.get(1).ok_or("error: missing text")?;
            match &runner.last_error {
                Some(e) if e.contains(needle.as_str()) => {}
                Some(e) => return Err(format!("error: expected {:?} in {:?}", needle, e)),
                None => return Err(format!("error: expected {:?}, but last command succeeded", needle)),
            }
        }
        other => return Err(format!("unknown assertion: {}", other)),
    }
    Ok(())
}
