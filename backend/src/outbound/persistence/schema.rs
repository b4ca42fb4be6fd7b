//! Diesel table definitions. Keep in sync with `migrations/`.

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        email -> Text,
        age -> BigInt,
        password -> Text,
    }
}
