// Kept in sync with migrations/schema.sql.

diesel::table! {
    users (user_id) {
        user_id -> Integer,
        email -> Text,
        password -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    profiles (user_id) {
        user_id -> Integer,
        full_name -> Text,
        study_focus -> Text,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    decks (deck_id) {
        deck_id -> Integer,
        user_id -> Integer,
        title -> Text,
        emoji -> Text,
        color -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    cards (card_id) {
        card_id -> Integer,
        deck_id -> Integer,
        question -> Text,
        answer -> Text,
        tags -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    study_logs (log_id) {
        log_id -> Integer,
        user_id -> Integer,
        deck_id -> Integer,
        card_id -> Integer,
        correct -> Bool,
        studied_at -> Timestamp,
    }
}

diesel::table! {
    card_reviews (review_id) {
        review_id -> Integer,
        user_id -> Integer,
        card_id -> Integer,
        ease_factor -> Double,
        interval_days -> Integer,
        last_rating -> Integer,
        reviewed_at -> Timestamp,
        next_review_at -> Timestamp,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(decks -> users (user_id));
diesel::joinable!(cards -> decks (deck_id));
diesel::joinable!(study_logs -> cards (card_id));
diesel::joinable!(card_reviews -> cards (card_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    profiles,
    decks,
    cards,
    study_logs,
    card_reviews,
);
