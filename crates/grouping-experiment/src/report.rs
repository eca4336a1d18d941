//! Plain-text reports for bounds, rounds and session statistics.

use std::fmt::Write;

use grouping_kernel::{
    Category, Feasibility, GroupingError, Roster, Round, RoundBounds, ScenarioRating,
    Statistics,
};

const RULE: &str = "============================================================";
const WIDE_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Members printed per line in round listings.
const MEMBERS_PER_LINE: usize = 4;

/// Full analysis of a single `(N, k)` configuration.
pub fn bounds_report(bounds: &RoundBounds) -> String {
    let mut out = String::new();
    let n = bounds.total_people;
    let k = bounds.group_size;

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Social grouping analysis");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Participants:      {}", n);
    let _ = writeln!(out, "Group size:        {}", k);
    let _ = writeln!(out, "Groups per round:  {}", bounds.num_groups);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Possible pairs:    C({}, 2) = {}",
        n, bounds.total_pairs
    );
    let _ = writeln!(
        out,
        "Pairs per group:   C({}, 2) = {}",
        k, bounds.pairs_per_group
    );
    let _ = writeln!(
        out,
        "Pairs per round:   {} x {} = {}",
        bounds.num_groups, bounds.pairs_per_group, bounds.pairs_per_round
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Theoretical max:   {} / {} = {:.2} rounds",
        bounds.total_pairs, bounds.pairs_per_round, bounds.max_rounds_theoretical
    );
    let _ = writeln!(out, "Practical max:     {} rounds", bounds.max_rounds_practical);
    let _ = writeln!(
        out,
        "Approximation:     (N-1)/(k-1) = ({}-1)/({}-1) = {:.2} (estimate only)",
        n,
        k,
        bounds.approximate_rounds()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Feasibility:       {}", feasibility_label(bounds.feasibility()));
    let _ = writeln!(out, "Advice:            {}", advice(bounds.max_rounds_practical));
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Side-by-side comparison of several configurations.
pub fn comparison_table(
    scenarios: &[(usize, usize)],
    results: &[Result<RoundBounds, GroupingError>],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", WIDE_RULE);
    let _ = writeln!(
        out,
        "{:>8} | {:>10} | {:>6} | {:>10} | {:>10} | {:>10}",
        "People", "Group size", "Groups", "Max rounds", "Pairs", "Rating"
    );
    let _ = writeln!(out, "{}", WIDE_RULE);

    for (&(people, size), result) in scenarios.iter().zip(results) {
        match result {
            Ok(bounds) => {
                let _ = writeln!(
                    out,
                    "{:>8} | {:>10} | {:>6} | {:>10} | {:>10} | {:>10}",
                    people,
                    size,
                    bounds.num_groups,
                    bounds.max_rounds_practical,
                    bounds.total_pairs,
                    rating_label(bounds.rating())
                );
            }
            Err(_) => {
                let _ = writeln!(
                    out,
                    "{:>8} | {:>10} | {:>6} | {:>10} | {:>10} | {:>10}",
                    people, size, "N/A", "N/A", "N/A", "invalid"
                );
            }
        }
    }
    let _ = writeln!(out, "{}", WIDE_RULE);
    out
}

/// Listing of a committed round.
pub fn round_report(round: &Round, roster: &Roster) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Round {}", round.number);
    let _ = writeln!(out, "{}", RULE);

    for (index, group) in round.partition.groups().iter().enumerate() {
        let a = group
            .members()
            .iter()
            .filter(|id| roster.category_of(id) == Some(Category::A))
            .count();
        let b = group.len() - a;
        let repeats = round.group_costs.get(index).map_or(0, |g| g.repeats);

        let _ = writeln!(
            out,
            "Group {} (A {}, B {}) - repeated pairs: {}",
            index + 1,
            a,
            b,
            repeats
        );
        for line in group.members().chunks(MEMBERS_PER_LINE) {
            let labels: Vec<String> = line
                .iter()
                .map(|id| match roster.get(id) {
                    Some(participant) => participant.to_string(),
                    None => id.clone(),
                })
                .collect();
            let _ = writeln!(out, "   {}", labels.join(" | "));
        }
    }

    let total_pairs: usize = round
        .partition
        .groups()
        .iter()
        .map(|g| g.len() * g.len().saturating_sub(1) / 2)
        .sum();
    let _ = writeln!(out);
    let _ = writeln!(out, "Repeated pairs: {}", round.cost.repeats);
    let _ = writeln!(out, "New pairs:      {}", total_pairs - round.cost.repeats);
    let _ = writeln!(
        out,
        "Cost:           {} (imbalance {})",
        round.cost.total, round.cost.imbalance
    );
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Session progress summary.
pub fn statistics_report(stats: &Statistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Statistics after round {}:", stats.rounds_elapsed);
    let _ = writeln!(out, "   Recorded pairs:  {}", stats.recorded_pairs);
    let _ = writeln!(out, "   Possible pairs:  {}", stats.total_pairs);
    let _ = writeln!(out, "   Coverage:        {:.1}%", stats.coverage * 100.0);
    let _ = writeln!(out, "   Max rounds:      {}", stats.max_rounds_practical);
    let _ = writeln!(out, "   Rounds left:     ~{}", stats.rounds_remaining);
    out
}

pub fn feasibility_label(feasibility: Feasibility) -> &'static str {
    match feasibility {
        Feasibility::Plentiful => "feasible (plenty of rounds)",
        Feasibility::Limited => "limited (few rounds)",
        Feasibility::Infeasible => "infeasible (not enough rounds)",
    }
}

pub fn rating_label(rating: ScenarioRating) -> &'static str {
    match rating {
        ScenarioRating::Excellent => "excellent",
        ScenarioRating::Good => "good",
        ScenarioRating::Limited => "limited",
        ScenarioRating::Impossible => "impossible",
    }
}

fn advice(max_rounds: usize) -> &'static str {
    match max_rounds {
        0..=2 => "very few rounds; consider smaller groups or more people",
        3..=4 => "a moderate number of rounds; perfect rounds may be hard to find",
        _ => "plenty of rounds; repeat-free schedules should be easy to find",
    }
}
