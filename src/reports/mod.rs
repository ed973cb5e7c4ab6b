use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use deckforge::config::ScoringPreset;
use deckforge::consts::DECK_SIZE;
use deckforge::deck::Deck;
use deckforge::optimizer::Suggestion;
use deckforge::scorer::MetricsReport;

const GRID_COLS: usize = 4;

pub fn print_deck(deck: &Deck) {
    println!("\nDeck: {}", deck.to_share_code());
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cells: Vec<Cell> = (0..DECK_SIZE)
        .map(|i| {
            let text = match deck.slot(i) {
                Some(card) => format!("{}\n{:.0}", card.display_name(), card.elixir_cost),
                None => "·".to_string(),
            };
            Cell::new(text).set_alignment(CellAlignment::Center)
        })
        .collect();

    for row in cells.chunks(GRID_COLS) {
        table.add_row(row.to_vec());
    }
    println!("{}", table);
}

fn percent_cell(value: u8) -> Cell {
    let color = match value {
        0..=39 => Color::Red,
        40..=69 => Color::Yellow,
        _ => Color::Green,
    };
    Cell::new(format!("{}%", value)).fg(color)
}

pub fn print_metrics(report: &MetricsReport, score: u8, preset: ScoringPreset) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new(format!("{} ({})", score, preset))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Avg Elixir"),
        Cell::new(format!("{:.2}", report.average_elixir)),
    ]);
    table.add_row(vec![
        Cell::new("Sigma"),
        Cell::new(format!("{:.2}", report.sigma)),
    ]);

    let rows = [
        ("Synergy", report.synergy),
        ("Offense", report.offense),
        ("Defense", report.defense),
        ("Cycle", report.cycle),
        ("Win Con", report.win_present),
        ("Spells", report.spell_coverage),
        ("Anti-Air", report.air_coverage),
        ("Swarm", report.swarm_coverage),
        ("Curve Fit", report.elixir_fitness),
        ("Balance", report.balance_fitness),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), percent_cell(value)]);
    }

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", table);
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("\nNo single swap improves this deck enough.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Slot"),
        Cell::new("Out").fg(Color::Red),
        Cell::new("In").fg(Color::Green),
        Cell::new("Delta").fg(Color::Cyan),
        Cell::new("New Score").add_attribute(Attribute::Bold),
    ]);

    for (rank, s) in suggestions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(s.slot_index + 1),
            Cell::new(s.replaced_card.display_name()).fg(Color::Red),
            Cell::new(s.candidate_card.display_name()).fg(Color::Green),
            Cell::new(format!("+{}", s.score_delta)).fg(Color::Cyan),
            Cell::new(s.new_score).add_attribute(Attribute::Bold),
        ]);
    }
    println!("\n{}", table);
}
