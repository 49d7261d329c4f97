//! Canned texts the bot answers with.

pub const GREETING: &str = "Hello there! \
https://media1.tenor.com/images/242ce12decbb1275829ec8e387990d17/tenor.gif?itemid=5312368";

pub const NO_DOGS: &str = "Sorry, no dogs available for adoption";

pub const UNKNOWN_COMMAND: &str =
    "Sorry, i don't know that command, try 'Help' for a list of commands";

pub const TRY_AGAIN: &str = "Error, please try again";

pub const UPSTREAM_DOWN: &str = "Sorry, I couldn't fetch a dog right now, please try again";

pub const BAD_PICTURE: &str = "Sorry, that dog picture looked wrong, please try again";

pub const HELP: &str = concat!(
    "Available commands:\n",
    " Hey - Say hello to the bot\n",
    " Show me - Shows a picture of a random dog\n",
    " Add dog - Adds a random dog to the shelter\n",
    " Adopt dog - Adopt a dog from the shelter\n",
    " How many - Gives a count of how many dogs are currently in the shelter\n",
    " Show all - Shows a picture of all dogs currently in the shelter\n",
    " Help - Shows this list",
);

pub fn dog_added(picture: &str) -> String {
    format!("New dog added {picture}")
}

pub fn dog_adopted(picture: &str) -> String {
    format!("Congratulations, you adopted a new dog {picture}")
}

pub fn dog_count(count: u64) -> String {
    format!("There are {count} Dogs currently in the shelter")
}
