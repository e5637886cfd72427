use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Validate, Default, Clone, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "اسم المستخدم مطلوب"))]
    pub username: String,

    #[validate(length(min = 1, message = "كلمة المرور مطلوبة"))]
    pub password: String,
}

/// Body of the seed endpoint used to insert users manually; there is no
/// self-service registration.
#[derive(Debug, Validate, Default, Clone, Deserialize)]
pub struct SeedUserDto {
    #[validate(length(min = 1, message = "اسم المستخدم مطلوب"))]
    pub username: String,

    #[validate(length(min = 6, message = "كلمة المرور يجب أن تكون 6 أحرف على الأقل"))]
    pub password: String,
}
