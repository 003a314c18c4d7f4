table! {
    movies (movie_id) {
        movie_id -> Varchar,
        title -> Varchar,
        genres -> Varchar,
    }
}

table! {
    ratings (rating_id) {
        rating_id -> Varchar,
        user_id -> Varchar,
        movie_id -> Varchar,
        rating -> Float8,
    }
}

table! {
    users (user_id) {
        user_id -> Varchar,
        name -> Varchar,
    }
}

joinable!(ratings -> movies (movie_id));
joinable!(ratings -> users (user_id));

allow_tables_to_appear_in_same_query!(
    movies,
    ratings,
    users,
);

/// DDL for every table, ratings last since it references the other two
pub const CREATE_TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (\
        user_id VARCHAR(10) PRIMARY KEY, \
        name VARCHAR(255) NOT NULL\
    )",
    "CREATE TABLE IF NOT EXISTS movies (\
        movie_id VARCHAR(10) PRIMARY KEY, \
        title VARCHAR(512) NOT NULL, \
        genres VARCHAR(255) NOT NULL\
    )",
    "CREATE TABLE IF NOT EXISTS ratings (\
        rating_id VARCHAR(10) PRIMARY KEY, \
        user_id VARCHAR(10) NOT NULL, \
        movie_id VARCHAR(10) NOT NULL, \
        rating DOUBLE PRECISION NOT NULL, \
        FOREIGN KEY (user_id) REFERENCES users(user_id), \
        FOREIGN KEY (movie_id) REFERENCES movies(movie_id)\
    )",
];
