use tribe_client::view::{ClubCard, DashboardStats, MemberRow, Notice, NoticeLevel, UserRow};
use tribe_client::{ClubAction, ClubDetails, MemberAction, PaymentRecord, Session};

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => print_success(&notice.message),
        NoticeLevel::Info => println!("• {}", notice.message),
        NoticeLevel::Error => print_error(&notice.message),
    }
}

pub fn print_session(session: &Session) {
    let user = &session.user;
    println!("{} (@{})", user.display_name(), user.username);
    println!("  id:    {}", user.id);
    println!("  role:  {}", user.role);
    if let Some(email) = &user.email {
        println!("  email: {email}");
    }
}

pub fn print_cards(cards: &[ClubCard]) {
    if cards.is_empty() {
        println!("No clubs found.");
        return;
    }
    for card in cards {
        let badge = card
            .badge
            .map(|role| format!(" [{role}]"))
            .unwrap_or_default();
        println!(
            "#{:<5} {}{}  ({} members, {})",
            card.id, card.name, badge, card.member_count, card.fee_label
        );
        if !card.description.is_empty() {
            println!("       {}", card.description);
        }
    }
}

pub fn print_dashboard(stats: &DashboardStats) {
    println!("Total clubs: {}", stats.total_clubs);
    println!("My clubs:    {}", stats.my_clubs);
    println!("Admin of:    {}", stats.admin_clubs);
    println!();
    println!("Recent clubs");
    print_cards(&stats.recent);
}

fn action_hint(actions: &[MemberAction]) -> String {
    if actions.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = actions
        .iter()
        .map(|a| match a {
            MemberAction::Promote => "promote",
            MemberAction::Remove => "remove",
        })
        .collect();
    format!("  <{}>", names.join(", "))
}

pub fn print_details(details: &ClubDetails, rows: &[MemberRow]) {
    let club = &details.club;
    println!("{} (#{})", club.name, club.id);
    if let Some(category) = &club.category {
        println!("  category: {category}");
    }
    println!("  fee:      {}", tribe_client::view::fee_label(club.fee()));
    if let Some(membership) = &details.membership {
        println!("  you:      {}", membership.club_role);
    }
    if !club.description.is_empty() {
        println!("  {}", club.description);
    }
    let actions: Vec<String> = details
        .actions()
        .into_iter()
        .map(|action| match action {
            ClubAction::Join(fee) => tribe_client::view::join_label(fee),
            ClubAction::Edit => "Edit Club".into(),
            ClubAction::Delete => "Delete Club".into(),
            ClubAction::Leave => "Leave Club".into(),
        })
        .collect();
    println!("  actions:  {}", actions.join(" | "));
    println!();
    println!("Members ({})", rows.len());
    for row in rows {
        println!(
            "  [{}] {:<20} {:<7} id {}{}",
            row.initial,
            row.name,
            row.role.as_str(),
            row.user_id,
            action_hint(&row.actions)
        );
    }
}

pub fn print_users(rows: &[UserRow]) {
    if rows.is_empty() {
        println!("No users found.");
        return;
    }
    for row in rows {
        println!("[{}] {} (@{}) id {}", row.initial, row.name, row.username, row.user_id);
        if row.clubs.is_empty() {
            println!("      no clubs");
        }
        for (club, role) in &row.clubs {
            println!("      {club} [{role}]");
        }
    }
}

pub fn print_payment(record: &PaymentRecord) {
    let amount = record
        .amount
        .map(|a| a.normalize().to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "#{:<5} {} {} {} order {}",
        record.id,
        amount,
        record.currency.as_deref().unwrap_or(""),
        record.status.as_deref().unwrap_or("-"),
        record.razorpay_order_id.as_deref().unwrap_or("-"),
    );
}
