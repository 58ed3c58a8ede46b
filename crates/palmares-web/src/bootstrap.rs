//! Startup seeding: the ballot catalog and the configured super admin.

use palmares_core::{BallotStore, Catalog, IdentifierKind, NewUser, Role};

use crate::config::ServerConfig;

pub async fn seed(config: &ServerConfig, store: &dyn BallotStore) -> anyhow::Result<()> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Catalog::load(path)?
        }
        None => Catalog::builtin()?,
    };
    catalog.seed(store).await?;

    if let Some(admin) = &config.admin {
        let email = IdentifierKind::Email.normalize(&admin.email);
        if store
            .find_by_identifier(IdentifierKind::Email, &email)
            .await?
            .is_none()
        {
            let new_user = NewUser {
                name: admin.name.clone(),
                email: Some(email),
                phone: admin
                    .phone
                    .as_deref()
                    .map(|p| IdentifierKind::Phone.normalize(p))
                    .filter(|p| !p.is_empty()),
                ..NewUser::default()
            };
            let user = store
                .create_user(new_user, admin.password_hash.clone(), Role::SuperAdmin)
                .await?;
            tracing::info!(user_id = %user.id, "Super admin created");
        }
    }

    Ok(())
}
