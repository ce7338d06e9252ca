use crate::{
    database::DocumentStore,
    error::{AppError, Result},
    models::{
        CartAction, CartRequest, DocumentId, Product, Record, User, UserRequest, has_text, require,
    },
    queries::document_queries,
    services::{
        password_service,
        reference_service::{self, lookup},
    },
};

fn profile_fields(request: &UserRequest) -> [(&'static str, bool); 5] {
    [
        ("username", has_text(&request.username)),
        ("role", has_text(&request.role)),
        ("first_name", has_text(&request.first_name)),
        ("last_name", has_text(&request.last_name)),
        ("email", has_text(&request.email)),
    ]
}

async fn ensure_username_free(store: &dyn DocumentStore, username: &str) -> Result<()> {
    let taken = document_queries::find_one_by::<User>(store, "username", username).await?;

    if taken.is_some() {
        return Err(AppError::DuplicateUsername(username.to_string()));
    }

    Ok(())
}

pub async fn create_user(
    store: &dyn DocumentStore,
    request: UserRequest,
    bcrypt_cost: u32,
) -> Result<Record<User>> {
    let mut fields = vec![("password", has_text(&request.password))];
    fields.extend(profile_fields(&request));
    require(&fields)?;

    let username = request.username.unwrap_or_default();
    ensure_username_free(store, &username).await?;

    let password =
        password_service::hash_password(request.password.as_deref().unwrap_or_default(), bcrypt_cost)
            .await?;

    let user = User {
        username,
        password,
        role: request.role.unwrap_or_default(),
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        cart: Vec::new(),
    };
    let record = document_queries::insert(store, user).await?;

    tracing::info!("Created user {} ({})", record.data.username, record.id);

    Ok(record)
}

/// Replaces the profile. The duplicate check only runs when the username
/// actually changes; the password is re-hashed only when supplied. The cart is
/// never touched here.
pub async fn update_user(
    store: &dyn DocumentStore,
    request: UserRequest,
    bcrypt_cost: u32,
) -> Result<Record<User>> {
    let mut fields = vec![("id", has_text(&request.id))];
    fields.extend(profile_fields(&request));
    require(&fields)?;

    let mut record =
        reference_service::load::<User>(store, request.id.as_deref().unwrap_or_default()).await?;

    let username = request.username.unwrap_or_default();
    if username != record.data.username {
        ensure_username_free(store, &username).await?;
    }

    if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
        record.data.password = password_service::hash_password(password, bcrypt_cost).await?;
    }

    record.data.username = username;
    record.data.role = request.role.unwrap_or_default();
    record.data.first_name = request.first_name.unwrap_or_default();
    record.data.last_name = request.last_name.unwrap_or_default();
    record.data.email = request.email.unwrap_or_default();

    document_queries::save(store, &record).await?;

    tracing::info!("Updated user {} ({})", record.data.username, record.id);

    Ok(record)
}

/// Per product the cart is either holding it or not; `add` and `remove` only
/// succeed as real transitions.
pub fn apply_cart_action(
    cart: &mut Vec<DocumentId>,
    product_id: DocumentId,
    action: CartAction,
) -> Result<()> {
    let present = cart.contains(&product_id);

    match action {
        CartAction::Add if present => Err(AppError::DuplicateCartItem(product_id)),
        CartAction::Add => {
            cart.push(product_id);
            Ok(())
        }
        CartAction::Remove if !present => Err(AppError::CartItemNotFound(product_id)),
        CartAction::Remove => {
            cart.retain(|id| *id != product_id);
            Ok(())
        }
    }
}

pub async fn update_cart(
    store: &dyn DocumentStore,
    user_id: &str,
    request: CartRequest,
) -> Result<Record<User>> {
    require(&[
        ("id", !user_id.trim().is_empty()),
        ("product_id", has_text(&request.product_id)),
        ("action", has_text(&request.action)),
    ])?;

    let token = request.action.unwrap_or_default();
    let action = CartAction::parse(&token).ok_or(AppError::InvalidAction(token))?;

    let mut record = reference_service::load::<User>(store, user_id).await?;

    let product = lookup::<Product>(store, request.product_id.as_deref())
        .await?
        .into_required("product_id")?;

    apply_cart_action(&mut record.data.cart, product.id, action)?;

    document_queries::save(store, &record).await?;

    tracing::info!(
        "Cart of user {} now holds {} products",
        record.id,
        record.data.cart.len()
    );

    Ok(record)
}
