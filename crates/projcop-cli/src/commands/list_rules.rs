//! List rules command implementation.

use projcop_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<32} Description", "Id");
    println!("{}", "-".repeat(100));

    for rule in all_rules() {
        println!("{:<32} {}", rule.id(), rule.description());
    }

    println!("\nEvery rule reads the configuration section named by its id, e.g.:");
    println!("  <Rules>");
    println!("    <WarningLevel enabled=\"true\"><MinimalValue>4</MinimalValue></WarningLevel>");
    println!("  </Rules>");
    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  projcop check --rules WarningLevel,NuGetPackageVersions");
    println!("\nRun `projcop init` to write every rule's default section to projcop.xml.");
}
