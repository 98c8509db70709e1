use anyhow::Result;
use tribe_client::{ClientError, RegisterRequest, TribeClient, UserRole};

use crate::cli::{LoginArgs, RegisterArgs};
use crate::output::{print_session, print_success};

pub async fn login(client: &TribeClient, args: &LoginArgs) -> Result<()> {
    let session = client.login(&args.username, &args.password).await?;
    print_success("Login successful!");
    print_session(&session);
    Ok(())
}

pub async fn register(client: &TribeClient, args: &RegisterArgs) -> Result<()> {
    let request = RegisterRequest {
        username: args.username.clone(),
        email: args.email.clone(),
        name: args.name.clone(),
        password: args.password.clone(),
        role: if args.admin {
            UserRole::Admin
        } else {
            UserRole::User
        },
    };
    let message = client.register(&request).await?;
    print_success(&message);
    Ok(())
}

pub async fn logout(client: &TribeClient) -> Result<()> {
    client.logout().await?;
    print_success("Logged out successfully");
    Ok(())
}

pub async fn whoami(client: &TribeClient) -> Result<()> {
    let session = client
        .session()
        .await
        .ok_or(ClientError::NotAuthenticated)?;
    print_session(&session);
    Ok(())
}
