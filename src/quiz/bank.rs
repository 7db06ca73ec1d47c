/// How a question is answered and what the right answer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice {
        options: &'static [&'static str],
        correct: usize,
    },
    TrueFalse {
        correct: bool,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub explanation: &'static str,
}

pub static QUESTIONS: &[Question] = &[
    Question {
        id: 1,
        prompt: "What is the primary purpose of a firewall in network security?",
        kind: QuestionKind::MultipleChoice {
            options: &[
                "To detect viruses on the network",
                "To monitor network performance",
                "To control access between networks based on rules",
                "To encrypt data during transmission",
            ],
            correct: 2,
        },
        explanation: "A firewall's primary purpose is to control access between networks by \
            enforcing security rules, allowing or blocking traffic based on predefined policies.",
    },
    Question {
        id: 2,
        prompt: "Using the same password across multiple accounts is considered a good security practice.",
        kind: QuestionKind::TrueFalse { correct: false },
        explanation: "Using the same password across multiple accounts is a poor security practice \
            because if one account is compromised, all other accounts become vulnerable.",
    },
    Question {
        id: 3,
        prompt: "What is a 'zero-day vulnerability'?",
        kind: QuestionKind::MultipleChoice {
            options: &[
                "A vulnerability discovered after a system has been running for zero days",
                "A weakness that is exploited the same day it is discovered",
                "A vulnerability unknown to the software vendor that hackers can exploit",
                "A security threat that poses zero risk to the system",
            ],
            correct: 2,
        },
        explanation: "A zero-day vulnerability is a software security flaw that is unknown to the \
            vendor and hasn't been patched, giving attackers the opportunity to exploit it before \
            a fix becomes available.",
    },
    Question {
        id: 4,
        prompt: "Multi-factor authentication (MFA) provides stronger security than just using a password alone.",
        kind: QuestionKind::TrueFalse { correct: true },
        explanation: "Multi-factor authentication requires two or more verification methods, making \
            it significantly more secure than single-factor authentication like a password alone.",
    },
    Question {
        id: 5,
        prompt: "Which of the following best describes a 'phishing' attack?",
        kind: QuestionKind::MultipleChoice {
            options: &[
                "Using specialized equipment to intercept wireless communications",
                "Sending deceptive messages to trick users into revealing sensitive information",
                "Exploiting software vulnerabilities to gain unauthorized access",
                "Using brute force to crack passwords",
            ],
            correct: 1,
        },
        explanation: "Phishing is a cybercrime where attackers disguise themselves as trustworthy \
            entities in emails, messages, or websites to trick users into revealing sensitive \
            information like passwords and credit card details.",
    },
];
