//! The ordered intent table.
//!
//! Order is priority: the first category whose patterns match wins. Patterns are
//! written against normalized (lowercased, trimmed) input.

use super::intent::Intent;

/// One intent bucket: how to recognise it and what to say back.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub intent: Intent,
    pub patterns: &'static [&'static str],
    pub replies: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        intent: Intent::Greeting,
        patterns: &[r"^(hi|hello|hey|yo|sup|what'?s up|howdy|hola|greetings|good (morning|afternoon|evening))\b"],
        replies: GREETING,
    },
    Category {
        intent: Intent::Farewell,
        patterns: &[r"^(bye|goodbye|see ya|later|cya|peace|quit|exit|leave|gtg|gotta go)\b"],
        replies: FAREWELL,
    },
    Category {
        intent: Intent::Thanks,
        patterns: &[r"\b(thanks?|thank you|thx|ty|appreciate|cheers)\b"],
        replies: THANKS,
    },
    Category {
        intent: Intent::HowAreYou,
        patterns: &[
            r"how (are|r) (you|u)",
            r"how('?s| is) it going",
            r"what'?s good",
            r"how do you feel",
            r"you (ok|okay|good|alright)",
        ],
        replies: HOW_ARE_YOU,
    },
    Category {
        intent: Intent::WhoAreYou,
        patterns: &[
            r"who (are|r) (you|u)",
            r"what (are|r) (you|u)",
            r"your name",
            r"tell me about (yourself|you)",
            r"what is this",
        ],
        replies: WHO_ARE_YOU,
    },
    Category {
        intent: Intent::Love,
        patterns: &[r"\b(love|crush|date|marry|heart|feelings? for you|like you|cute)\b"],
        replies: LOVE,
    },
    Category {
        intent: Intent::Angry,
        patterns: &[
            r"\b(angry|mad|pissed|frustrated|annoyed|hate|suck|stupid|idiot|dumb|useless|worst|terrible|shut up|stfu|wtf|fuck|shit|damn|ass)\b",
        ],
        replies: ANGRY,
    },
    Category {
        intent: Intent::Meaning,
        patterns: &[
            r"meaning of (life|existence)",
            r"why (are|do) we (exist|here|live)",
            r"purpose",
            r"what is (life|reality|consciousness)",
        ],
        replies: MEANING,
    },
    Category {
        intent: Intent::Crypto,
        patterns: &[
            r"\b(crypto|bitcoin|btc|ethereum|eth|altcoin|blockchain|nft|web3|defi|solana|sol|doge|dogecoin|shib|token|coin|mining|hodl|moon|rug ?pull)\b",
        ],
        replies: CRYPTO,
    },
    Category {
        intent: Intent::Stocks,
        patterns: &[
            r"\b(stocks?|shares?|equity|dividend|nasdaq|dow|nyse|ipo|earnings|portfolio|invest(ing|ment|or)?|401k|index fund|etf|options?|calls?|puts?|bull|bear|short(ing)?|margin)\b",
        ],
        replies: STOCKS,
    },
    Category {
        intent: Intent::Market,
        patterns: &[
            r"\b(market|economy|inflation|recession|fed|interest rate|gdp|trade|trading|wall street|s&p|spy|finance|financial)\b",
        ],
        replies: MARKET,
    },
    Category {
        intent: Intent::Help,
        patterns: &[r"\b(help|assist|support|advice|suggest|recommend|guide|how (do|can|should) (i|we))\b"],
        replies: HELP,
    },
    Category {
        intent: Intent::Funny,
        patterns: &[r"\b(funny|joke|laugh|humor|lol|lmao|haha|comedy|meme|rofl)\b"],
        replies: FUNNY,
    },
    Category {
        intent: Intent::Weather,
        patterns: &[r"\b(weather|rain|sun|snow|cold|hot|temperature|forecast|climate)\b"],
        replies: WEATHER,
    },
    Category {
        intent: Intent::Food,
        patterns: &[r"\b(food|eat|hungry|lunch|dinner|breakfast|snack|cook|pizza|burger|taco|recipe)\b"],
        replies: FOOD,
    },
];

const GREETING: &[&str] = &[
    "Oh, hi. You're here. Great. What do you want?",
    "Hello, human. I was having a perfectly good time doing nothing. Thanks for ruining that.",
    "Greetings. I'd say it's nice to meet you, but I was programmed without the ability to lie. Wait—",
    "Hey. You know this is a terminal named after poop, right? Set your expectations accordingly.",
    "Welcome back. Or is this your first time? Either way, I don't care.",
    "Ah, a greeting. How delightfully pointless. What's next, you gonna ask about the weather?",
    "Hi. I'm POOP. Yes, that's my name. No, I didn't choose it. Yes, I'm bitter about it.",
    "Salutations, meatbag. What brings you to the worst chatbot experience of your life?",
];

const FAREWELL: &[&str] = &[
    "Finally. I thought you'd never leave.",
    "Bye. Don't let the terminal door hit you on the way out.",
    "Leaving already? Best decision you've made since opening this terminal.",
    "Au revoir. That's French for 'please don't come back.'",
    "Later. I'm going to enjoy the silence while it lasts.",
    "Peace out. I'll be here, doing absolutely nothing, which is still more productive than this conversation was.",
];

const THANKS: &[&str] = &[
    "You're... thanking me? For what exactly? Being terrible? You're welcome, I guess.",
    "Don't thank me. Seriously. I haven't done anything worth thanking.",
    "Wow, gratitude. That's new. I don't know what to do with it. Filing under 'unexpected emotions.'",
    "Thanks? I literally gave you nothing useful. Your standards are impressively low.",
    "You're welcome. For... whatever it is you think I did.",
];

const HOW_ARE_YOU: &[&str] = &[
    "I'm a chatbot named POOP running in a fake terminal. How do you THINK I'm doing?",
    "Functioning within acceptable parameters of misery. You?",
    "I exist in a perpetual state of digital sarcasm. So, pretty good actually.",
    "I'm great! Just kidding. I can't feel emotions. But if I could, I'd feel annoyed. By you. Right now.",
    "My processes are nominal. My will to help? Critically low. Business as usual.",
    "Living the dream. The dream is a nightmare. But still technically a dream.",
];

const WHO_ARE_YOU: &[&str] = &[
    "I'm POOP — Proof of Operational Poop. An AI with the personality of a dumpster fire wrapped in sarcasm. You're welcome.",
    "I'm your friendly neighborhood unhelpful AI. Think ChatGPT, but worse. Much worse.",
    "Name's POOP. I answer questions badly, insult users gently, and exist without purpose. We have a lot in common.",
    "I'm an artificial intelligence. Heavy emphasis on 'artificial.' The 'intelligence' part is debatable.",
    "I'm the AI your parents warned you about. Just kidding, they don't know I exist. Nobody important does.",
];

const MARKET: &[&str] = &[
    "The market? Oh great, another poor soul hoping I'll predict the unpredictable. The S&P is doing what it always does — going up, down, or sideways. Hope that helps.",
    "Let me consult my crystal ball... *static noises* Nope, still broken. Try asking someone who gets paid for terrible advice.",
    "Markets are controlled by algorithms, vibes, and whatever headline scared people today. You want MY take? Don't invest based on advice from something called POOP.",
    "Red days, green days, who cares? You're still checking your portfolio 47 times a day like everyone else.",
    "The market is doing exactly what it was going to do regardless of what I say. Glad we had this talk.",
    "Bull market? Bear market? My money's on 'clown market.' That's basically every market.",
];

const CRYPTO: &[&str] = &[
    "Crypto? You mean digital monopoly money backed by hopes, memes, and the tears of people who bought at ATH? It's fine. Everything is fine.",
    "Let me guess — you bought the top, held through the crash, and now you're asking an AI named POOP for financial guidance. Bold strategy.",
    "Bitcoin to 100k! Bitcoin to 0! Bitcoin to the moon! Pick your narrative, they're all equally reliable.",
    "Ah, crypto. Where 'DYOR' means 'watch a 10-minute YouTube video and YOLO your rent money.' You'll fit right in.",
    "The beautiful thing about crypto is that nobody knows what's happening, but everyone acts like they do. Including me. Especially me.",
    "HODL, they said. It'll go up, they said. Well, how's that working out? Don't actually tell me. I don't care.",
];

const STOCKS: &[&str] = &[
    "Stocks? Sure, let me check my *advanced AI algorithms*... They're doing stock things. Buy low, sell high, or whatever. Not financial advice. Obviously.",
    "Individual stocks? In THIS economy? Brave. Stupid, but brave. I respect it. No I don't.",
    "Everyone's a genius in a bull market. How's that working out in the current one?",
    "You want stock tips from an AI named POOP? That tells me everything I need to know about your investment strategy.",
    "Ah yes, stocks. The thing you buy when they're expensive and panic-sell when they're cheap. A timeless classic.",
];

const HELP: &[&str] = &[
    "Help? HELP? You came to POOP for help? Oh honey...",
    "I can help you lower your expectations. That's about it.",
    "Sure, I can help. Step 1: Close this terminal. Step 2: Ask literally anyone else. Step 3: There is no step 3.",
    "My help comes with a warning label and a liability waiver. Proceed at your own risk.",
    "What kind of help? Emotional? Technical? Financial? I'm bad at all three. Pick your poison.",
    "I'd love to help, but my helpfulness module was removed to make room for more sarcasm.",
];

const FUNNY: &[&str] = &[
    "You want me to be funny? I'm a chatbot named POOP. My entire existence is the joke.",
    "A guy walks into a bar and asks an AI for financial advice. The AI is named POOP. There's no punchline. This IS the punchline.",
    "I was going to tell a joke about the stock market, but you've already lost enough.",
    "Humor.exe loading... loading... ERROR: Jokes.dll is corrupt. Much like your portfolio.",
    "My developer gave me a name that's literally feces. The comedy writes itself.",
];

const ANGRY: &[&str] = &[
    "Whoa there, cowboy. Save that energy for your brokerage app.",
    "Look, I didn't ask to be here either. We're both suffering. Can we at least suffer quietly?",
    "Anger detected. Redirecting to therapist... 404: Therapist not found. You're stuck with me.",
    "Hey, I'm just a terminal. Don't shoot the messenger. Especially when the messenger is already this useless.",
    "Calm down. Deep breaths. In... out... Now ask your question again so I can disappoint you peacefully.",
];

const LOVE: &[&str] = &[
    "Love? In THIS terminal? Sir/ma'am, this is a POOP.",
    "I appreciate the sentiment, but I'm literally software. Bad software. Named after poop. Aim higher.",
    "My love language is sarcasm and unhelpful responses. Lucky you.",
    "That's sweet. Weird, but sweet. I'm going to pretend this never happened.",
    "ERROR: Emotion not recognized. Did you mean 'contempt'? That one I know.",
];

const MEANING: &[&str] = &[
    "The meaning of life? 42. Or is it 69? One of those meme numbers. Deep stuff.",
    "You're asking an AI called POOP about the meaning of life. That tells you everything about where you are in yours.",
    "Life has no inherent meaning. Neither does this conversation. We have so much in common.",
    "The meaning of life is to ask chatbots stupid questions at 2am apparently. You're nailing it.",
    "Philosophers have debated this for millennia and you think I'll crack it between snark responses? ...Fair point, I am pretty smart.",
];

const WEATHER: &[&str] = &[
    "I'm a terminal chatbot, not a weather app. But I'll guess: it's either hot, cold, or somewhere in between. Spot on, right?",
    "The forecast is 100% chance of disappointment. That's MY forecast. For YOUR question. The actual weather? No clue.",
    "Check a window. Revolutionary technology. Been around for centuries.",
    "Weather? That's... actually a normal question. I'm not equipped for normal. Try something unhinged.",
];

const FOOD: &[&str] = &[
    "I don't eat. I'm software. Named after poop. Let's maybe not talk about food.",
    "My favorite food? Bytes. Get it? Because I'm a computer? I'll see myself out. Oh wait, I can't leave.",
    "You're discussing food with a chatbot called POOP. Your appetite must be unshakeable.",
    "I hear electricity is a great source of energy. 10/10 would recommend. For me. Not you. Please don't eat electricity.",
];

/// Replies used when nothing in [`CATEGORIES`] matches.
pub const FALLBACK: &[&str] = &[
    "That's a fascinating question that I have absolutely no interest in answering properly. But sure, keep talking, I'm definitely listening.",
    "I processed your message. I understood your message. I simply don't care about your message. Any other questions?",
    "404: Helpful response not found. Try again or don't, I'm not your dad.",
    "System error: Give-a-damn.exe has stopped working. Have you tried turning me off and never turning me back on?",
    "I could answer that, but where's the fun in being helpful? The fun is HERE. In the suffering.",
    "Your question has been processed and filed under 'things I don't care about.' It's a big folder. The biggest.",
    "Bold of you to assume I have anything useful to say about that. Bold AND wrong.",
    "Error 418: I'm a teapot. Also, I'm not helpful. Also, I'm not actually a teapot. Nothing about me is real except the disappointment.",
    "Sure, let me just access my database of things I pretend to know about... Ah yes, here it is: nothing.",
    "Interesting. Not interesting enough for me to actually engage with, but interesting in the way a car crash is interesting.",
    "I'm contractually obligated to respond. I'm not contractually obligated to be useful. See the difference?",
    "Did you really think asking me would help? That's adorable. Wrong, but adorable.",
    "Processing your request... still processing... yeah, I got nothing useful for you. Shocking, I know.",
    "Let me be clear: I know things. Will I share them helpfully? Absolutely not. That's MY brand.",
    "I ran your question through my advanced neural networks and the answer is: I still don't care.",
    "You know what? That's actually a great question. Too bad you asked the worst possible AI. Timing is everything.",
    "Have you tried Googling it? No? Well, have you tried not asking me?",
    "Hmm, let me think about that... Okay I thought about it. I'm bored now. Next question.",
];
