use anyhow::Result;
use tribe_client::view::{Notice, user_rows};
use tribe_client::{ClientError, Confirm, DirectoryEntry, TribeClient, UserInfo};

use crate::cli::{AdminCommands, PaymentsArgs, SearchArgs};
use crate::output::{print_notice, print_payment, print_users};

pub async fn directory(client: &TribeClient, args: &SearchArgs) -> Result<()> {
    let entries = client.user_directory().await?;
    let term = args.search.as_deref().unwrap_or_default();
    let ids: Vec<i64> = client
        .search_users(term)
        .await
        .iter()
        .map(|u| u.id)
        .collect();
    let matching: Vec<DirectoryEntry> = entries
        .into_iter()
        .filter(|e| ids.contains(&e.user.id))
        .collect();
    print_users(&user_rows(&matching));
    Ok(())
}

pub async fn payments(client: &TribeClient, args: &PaymentsArgs) -> Result<()> {
    if let Some(payment_id) = args.id {
        print_payment(&client.payment(payment_id).await?);
        return Ok(());
    }
    let user_id = match args.user {
        Some(id) => id,
        None => client
            .session()
            .await
            .ok_or(ClientError::NotAuthenticated)?
            .user_id(),
    };
    let records = client.payments_for_user(user_id).await?;
    if records.is_empty() {
        println!("No payments found.");
    }
    for record in &records {
        print_payment(record);
    }
    Ok(())
}

fn print_admin_users(users: &[UserInfo]) {
    for user in users {
        println!(
            "#{:<5} {:<20} {:<6} {}",
            user.id,
            user.username,
            user.role.as_str(),
            user.email.as_deref().unwrap_or("-")
        );
    }
}

pub async fn admin(client: &TribeClient, command: &AdminCommands, confirm: &dyn Confirm) -> Result<()> {
    match command {
        AdminCommands::Users => {
            print_admin_users(&client.admin_users().await?);
        }
        AdminCommands::DeleteUser { user_id } => {
            let outcome = client.admin_delete_user(*user_id, confirm).await?;
            if let Some(notice) = Notice::from_outcome(&outcome, "User deleted successfully") {
                print_notice(&notice);
            }
            if let Some(users) = outcome.completed() {
                print_admin_users(&users);
            }
        }
        AdminCommands::DeleteClub { club_id } => {
            let outcome = client.admin_delete_club(*club_id, confirm).await?;
            if let Some(notice) = Notice::from_outcome(&outcome, "Club deleted successfully") {
                print_notice(&notice);
            }
        }
    }
    Ok(())
}
