use std::env;
use std::process::ExitCode;

use schem_convert::{convert_path, verify_path};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        let program = args.first().map(String::as_str).unwrap_or("schem_convert");
        println!("Usage: {program} <input.schem> <output.schem>");
        println!();
        println!("Convert a Sponge Schematic v3 (MC 1.20.5+) to v2 (WorldEdit 7.2.x)");
        return ExitCode::from(1);
    }

    let (input, output) = (&args[1], &args[2]);
    println!("Input:  {input}");
    println!("Output: {output}");

    let summary = match convert_path(input, output) {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!("conversion failed: {error}");
            return ExitCode::from(1);
        }
    };

    if let Some(version) = summary.source_version {
        println!("Source version: {version}");
    }
    println!("Version -> 2");
    if let Some(entries) = summary.palette_entries {
        println!("Palette: {entries} entries");
    }
    if let Some(total) = summary.block_entities {
        println!(
            "BlockEntities: {total} total, {} with items",
            summary.block_entities_with_items
        );
    }
    if let Some(total) = summary.entities {
        println!("Entities: {total} converted");
    }
    println!("Saved: {output}");

    match verify_path(output) {
        Ok(verification) => {
            println!(
                "Verify: root_name={:?} (expect \"Schematic\")",
                verification.root_name
            );
            if let Some(version) = verification.version {
                println!("Verify: Version={version} (expect 2)");
            }
            println!("Verify: Palette exists = {}", verification.has_palette);
            println!("Verify: BlockData exists = {}", verification.has_block_data);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("verification failed: {error}");
            ExitCode::from(1)
        }
    }
}
