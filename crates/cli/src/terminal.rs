use pharos_mint::{PageState, Status, StatusKind, StatusSink};
use yansi::Paint;

/// Prints statuses as lines, errors to stderr.
#[derive(Debug, Default)]
pub struct TerminalStatus;

impl StatusSink for TerminalStatus {
    fn show(&mut self, status: &Status) {
        let message = status.message();
        match status.kind() {
            StatusKind::Loading => println!("{} {message}", "…".dim()),
            StatusKind::Success => println!("{}", message.green().bold()),
            StatusKind::Error => eprintln!("{}", message.red()),
            StatusKind::Info => println!("{}\n{message}", status.title().bold()),
        }
    }
}

/// Prints the wallet, network and supply panel of the page.
pub fn print_page(page: &PageState) {
    if let Some(wallet) = &page.wallet_label {
        println!("{}", wallet.bold());
    }
    let network =
        if page.network_ok { page.network_label.green() } else { page.network_label.yellow() };
    println!("Network:   {network}");
    println!("Remaining: {}", page.remaining);
    println!("Quantity:  {} ({})", page.quantity, page.cost);
}
