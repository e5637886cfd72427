pub mod login_dto;
