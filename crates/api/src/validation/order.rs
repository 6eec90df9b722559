use std::borrow::Cow;

use sentinel_core::models::OrderItem;
use validator::ValidationError;

/// 验证下单条目：数量必须为正数
pub fn validate_order_items(items: &[OrderItem]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.quantity <= 0) {
        return Err(ValidationError::new("quantity")
            .with_message(Cow::Borrowed("Quantity must be positive")));
    }
    Ok(())
}
