mod owned_games;
mod vanity;
