use super::cli_main::ask;
use crate::Converters::unit_converter::{
    AnyConverter, INVALID_INPUT_DISPLAY, UnitConverter, parse_input,
};
use prettytable::{Cell, Row, Table};

pub fn converters_menu() {
    let converters = AnyConverter::all();
    loop {
        println!("\n=== Unit converters ===");
        for (i, conv) in converters.iter().enumerate() {
            println!("{}. {} ({})", i + 1, conv.quantity_name(), conv.unit_symbols().join(", "));
        }
        println!("0. Back");
        let Some(choice) = ask("Choose quantity: ") else {
            break;
        };
        if choice == "0" {
            break;
        }
        match choice.parse::<usize>() {
            Ok(n) if n >= 1 && n <= converters.len() => {
                if let Err(e) = convert_once(&converters[n - 1]) {
                    println!("Error: {}", e);
                }
            }
            _ => println!("Invalid option"),
        }
    }
}

/// asks for a value and its unit, prints the value in every unit of the quantity
fn convert_once(conv: &AnyConverter) -> Result<(), String> {
    let text = ask("Value: ").ok_or("no input")?;
    let from = ask(&format!("Unit ({}): ", conv.unit_symbols().join("/"))).ok_or("no input")?;
    let Ok(value) = parse_input(&text) else {
        println!("{}", INVALID_INPUT_DISPLAY);
        return Ok(());
    };
    let all = conv.convert_all(value, &from).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Unit"), Cell::new("Value")]));
    for (symbol, converted) in all {
        table.add_row(Row::new(vec![
            Cell::new(symbol),
            Cell::new(&conv.format_value(converted)),
        ]));
    }
    table.printstd();
    Ok(())
}
