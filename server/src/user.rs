#[derive(Clone, Debug, PartialEq)]
pub(crate) struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Fixed identity every request acts as. There is no authentication; the
/// stub only guarantees that boards have an owner row to reference.
#[derive(Clone, Debug)]
pub(crate) struct DemoIdentity {
    user: User,
}

impl DemoIdentity {
    pub(crate) fn new(id: String, email: String) -> DemoIdentity {
        DemoIdentity {
            user: User {
                id,
                email,
                name: Some("Demo User".to_string()),
            },
        }
    }

    pub(crate) fn user(&self) -> &User {
        &self.user
    }
}

pub(crate) async fn require_user(state: &crate::State) -> ::anyhow::Result<User> {
    let user = state.demo_identity.user();

    state.store.ensure_user(user).await?;

    Ok(user.clone())
}
