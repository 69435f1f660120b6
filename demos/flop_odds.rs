use flop_odds::core::{Board, Hand, Value};
use flop_odds::holdem::{Distribution, ProbabilityTable, Range, RangeAggregator, Street};

fn print_table(table: &ProbabilityTable) {
    for street in Street::ALL {
        println!("  {street}:");
        for (category, p) in table[street].iter().filter(|(_, p)| *p > 0.0) {
            println!("    {category}: {:.2}%", p * 100.0);
        }
    }
}

fn main() {
    println!("=== Flop Odds Example ===\n");

    // Example 1: one hand against one hand
    println!("Example 1: Flush Draw vs Top Pair");
    println!("Board: Kc 7c Ts");
    let flop: Board = "Kc7cTs".parse().unwrap();

    println!("Hero: Kd 3c (Top Pair)");
    let hero: Hand = "Kd3c".parse().unwrap();

    println!("Villain: Ac Qc (Nut Flush Draw)\n");
    let villain: Hand = "AcQc".parse().unwrap();

    let dist = Distribution::new(villain, &flop, hero).unwrap();
    println!("Villain makes {} on the flop", dist.category);
    println!(
        "  Straight draw: {}, flush draw: {}",
        dist.draws.straight, dist.draws.flush
    );
    print_table(&dist.table);
    println!("  Ahead of the hero:");
    for street in Street::ALL {
        println!("    {street}: {:.2}%", dist.beats_rival[street] * 100.0);
    }

    // Example 2: the same hero against every pocket pair
    println!("\n=== Example 2: Range of Pocket Pairs ===");
    let range = Range::pocket_pairs(Value::Two);
    println!("Range: {} combos before card removal", range.len());

    let outcome = RangeAggregator::default()
        .aggregate(&range, &flop, hero)
        .unwrap();
    let Some(report) = outcome.report() else {
        println!("Every combo conflicts with the board or the hero");
        return;
    };

    println!("Combos evaluated: {}", report.combos);
    println!("Hero makes {} on the flop\n", report.hero_category);
    println!("Opponent:");
    print_table(&report.opponent);
    println!("\nHero:");
    print_table(&report.hero_table);

    println!("\nOpponent ahead of the hero's flop hand:");
    for street in Street::ALL {
        println!("  {street}: {:.2}%", report.opponent_beats_hero[street] * 100.0);
    }
    println!(
        "Opponent draws: straight {:.2}%, flush {:.2}%",
        report.opponent_draws.straight * 100.0,
        report.opponent_draws.flush * 100.0
    );
}
