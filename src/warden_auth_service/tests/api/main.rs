mod cors;
mod health;
mod helpers;
mod login;
mod rate_limit;
mod refresh_token;
mod signup;
mod validate_token;
