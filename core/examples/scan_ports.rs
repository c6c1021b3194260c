//! Example: Scan and display all listening ports.

use portctl_core::list_listening_processes;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("Scanning ports...\n");

    let records = list_listening_processes().await;
    if records.is_empty() {
        println!("No listening ports found.");
        return;
    }

    println!(
        "{:<6} {:<8} {:<20} {:<10} {}",
        "PORT", "PID", "COMMAND", "USER", "NAME"
    );
    println!("{}", "-".repeat(80));

    for record in &records {
        println!(
            "{:<6} {:<8} {:<20} {:<10} {}",
            record.port,
            record.pid,
            record.command.chars().take(20).collect::<String>(),
            record.user,
            record.name
        );
    }

    println!("\nTotal: {} ports", records.len());
}
