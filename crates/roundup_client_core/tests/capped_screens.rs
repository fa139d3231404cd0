//! Capped mode through the bridge: emergency fund, halal investments and sadaqah project screens.

use crate::common::allocation_screen::AllocationScreen;

#[test]
fn emergency_fund_rejects_increase_past_100() -> Result<(), String> {
    let screen = AllocationScreen::open("emergency_fund")?;
    screen.assert_commands(&["buckets 40 30 20 10", "total 100"])?;
    screen.run_commands(&["adjust 1 +5"])?;
    screen.assert_commands(&[
        "outcome rejected",
        "reason would_exceed_cap",
        "buckets 40 30 20 10",
        "can_save true",
    ])
}

#[test]
fn emergency_fund_decrease_leaves_others_and_blocks_save() -> Result<(), String> {
    let screen = AllocationScreen::open("emergency_fund")?;
    screen.run_commands(&["adjust 2 -10"])?;
    screen.assert_commands(&["outcome applied", "buckets 40 20 20 10", "total 90", "can_save false"])?;
    screen.run_commands(&["save"])?;
    screen.assert_commands(&["error \"currently 90%\""])?;
    screen.run_commands(&["adjust 4 +10", "save"])?;
    screen.assert_commands(&["buckets 40 20 20 20", "total 100", "can_save true"])
}

#[test]
fn capped_headroom_is_accepted_up_to_exactly_100() -> Result<(), String> {
    let screen = AllocationScreen::new();
    screen.run_commands(&["open_custom capped x=0 y=50 z=45", "adjust x +10"])?;
    screen.assert_commands(&["outcome rejected", "total 95"])?;
    screen.run_commands(&["adjust x +5"])?;
    screen.assert_commands(&["outcome applied", "buckets 5 50 45", "total 100"])?;
    screen.run_commands(&["adjust x +1"])?;
    screen.assert_commands(&["outcome rejected", "buckets 5 50 45"])
}

#[test]
fn halal_investment_group_totals_follow_adjustments() -> Result<(), String> {
    let screen = AllocationScreen::open("halal_investments")?;
    screen.assert_commands(&["group 1 30", "group 2 40", "group 3 18", "group 4 12", "total 100"])?;
    screen.run_commands(&["adjust 2-2222.SR -5"])?;
    screen.assert_commands(&["group 2 35", "total 95", "can_save false"])?;
    screen.run_commands(&["adjust 4-PLAT +5"])?;
    screen.assert_commands(&["group 4 17", "total 100", "can_save true"])
}

#[test]
fn sadaqah_projects_open_at_100_and_stay_capped() -> Result<(), String> {
    let screen = AllocationScreen::open("sadaqah_projects")?;
    screen.assert_commands(&["group 1 30", "total 100"])?;
    screen.run_commands(&["adjust \"4-Water Wells - Africa\" +1"])?;
    screen.assert_commands(&["outcome rejected", "reason would_exceed_cap", "total 100"])
}
