use anyhow::Result;
use tribe_client::view::{Notice, club_cards, member_rows};
use tribe_client::{Club, ClubDraft, Confirm, Fee, TribeClient};

use crate::cli::{CreateArgs, EditArgs, SearchArgs};
use crate::output::{print_cards, print_dashboard, print_details, print_notice, print_success};
use crate::prompt::{TerminalCheckout, fee_notice};

fn report<T>(outcome: &tribe_client::ActionOutcome<T>, success: &str) {
    if let Some(notice) = Notice::from_outcome(outcome, success) {
        print_notice(&notice);
    }
}

pub async fn dashboard(client: &TribeClient) -> Result<()> {
    let stats = client.dashboard().await?;
    print_dashboard(&stats);
    Ok(())
}

pub async fn list(client: &TribeClient, args: &SearchArgs) -> Result<()> {
    client.load_clubs().await?;
    let clubs = client
        .search_clubs(args.search.as_deref().unwrap_or_default())
        .await;
    print_cards(&club_cards(&clubs, false));
    Ok(())
}

pub async fn my_clubs(client: &TribeClient) -> Result<()> {
    let memberships = client.load_my_clubs().await?;
    print_cards(&club_cards(memberships.iter().map(|m| &m.club), true));
    Ok(())
}

pub async fn show(client: &TribeClient, club_id: i64) -> Result<()> {
    let details = client.club_details(club_id).await?;
    print_details(&details, &member_rows(&details));
    Ok(())
}

pub async fn create(client: &TribeClient, args: &CreateArgs) -> Result<()> {
    let draft = ClubDraft {
        name: args.name.clone(),
        description: args.description.clone(),
        category: args.category.clone(),
        fee: args.price.map_or(Fee::Free, Fee::Paid),
    };
    let club = client.create_club(&draft).await?;
    print_success("Club created successfully!");
    print_cards(&club_cards([&club], true));
    Ok(())
}

/// Apply the given flags on top of the club's current values
fn merge_draft(club: &Club, args: &EditArgs) -> ClubDraft {
    let mut draft = ClubDraft::from_club(club);
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if let Some(category) = &args.category {
        draft.category = category.clone();
    }
    if args.free {
        draft.fee = Fee::Free;
    } else if let Some(price) = args.price {
        draft.fee = Fee::Paid(price);
    }
    draft
}

pub async fn edit(client: &TribeClient, args: &EditArgs) -> Result<()> {
    let current = client.club(args.club_id).await?;
    let club = client
        .edit_club(args.club_id, &merge_draft(&current, args))
        .await?;
    print_success("Club updated successfully!");
    print_cards(&club_cards([&club], false));
    Ok(())
}

pub async fn delete(client: &TribeClient, club_id: i64, confirm: &dyn Confirm) -> Result<()> {
    let outcome = client.delete_club(club_id, confirm).await?;
    report(&outcome, "Club deleted successfully");
    Ok(())
}

pub async fn join(client: &TribeClient, club_id: i64) -> Result<()> {
    if let Some(club) = client.cache().await.find_club(club_id)
        && let Some(notice) = fee_notice(club.fee())
    {
        println!("{notice}");
    }
    let outcome = client.join_club(club_id, &TerminalCheckout).await?;
    report(&outcome, "Successfully joined the club!");
    Ok(())
}

pub async fn leave(client: &TribeClient, club_id: i64, confirm: &dyn Confirm) -> Result<()> {
    let outcome = client.leave_club(club_id, confirm).await?;
    report(&outcome, "Successfully left the club");
    Ok(())
}

pub async fn promote(
    client: &TribeClient,
    club_id: i64,
    user_id: i64,
    confirm: &dyn Confirm,
) -> Result<()> {
    let outcome = client.promote_member(club_id, user_id, confirm).await?;
    report(&outcome, "Member promoted successfully");
    if let Some(details) = outcome.completed() {
        print_details(&details, &member_rows(&details));
    }
    Ok(())
}

pub async fn remove_member(
    client: &TribeClient,
    club_id: i64,
    user_id: i64,
    confirm: &dyn Confirm,
) -> Result<()> {
    let outcome = client.remove_member(club_id, user_id, confirm).await?;
    report(&outcome, "Member removed successfully");
    if let Some(details) = outcome.completed() {
        print_details(&details, &member_rows(&details));
    }
    Ok(())
}
